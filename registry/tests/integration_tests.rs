use std::cell::RefCell;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::rc::Rc;
use std::thread;

use serde_json::Value;
use slash_command_core::{
    ArgumentDescriptor, ArgumentOptions, CommandPackage, Permission, SlashCommand,
    SlashCommandData,
};
use slash_command_registry::{
    CommandManager, HttpRegistrar, Registrar, RegistrationConfig, RegistryError, Result,
    SlashCommandExt, log_definition,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MemoryRegistrar {
    bodies: RefCell<Vec<Value>>,
}

impl Registrar for MemoryRegistrar {
    fn put_commands(
        &self,
        _config: &RegistrationConfig,
        commands: &[SlashCommandData],
    ) -> Result<usize> {
        self.bodies
            .borrow_mut()
            .push(serde_json::to_value(commands)?);
        Ok(commands.len())
    }
}

struct CapturedRequest {
    head: String,
    body: String,
}

/// Serves exactly one HTTP request with the given status and JSON body.
fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let n = stream.read(&mut chunk).unwrap();
            buffer.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            assert!(n > 0, "connection closed before headers");
        };

        let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
        let lower = head.to_ascii_lowercase();
        let content_length = lower
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .map(|value| value.trim().parse::<usize>().unwrap());

        match content_length {
            Some(len) => {
                while buffer.len() < header_end + len {
                    let n = stream.read(&mut chunk).unwrap();
                    assert!(n > 0, "connection closed before body");
                    buffer.extend_from_slice(&chunk[..n]);
                }
            }
            None => {
                while !buffer.ends_with(b"0\r\n\r\n") {
                    let n = stream.read(&mut chunk).unwrap();
                    assert!(n > 0, "connection closed before last chunk");
                    buffer.extend_from_slice(&chunk[..n]);
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        CapturedRequest {
            head,
            body: String::from_utf8_lossy(&buffer[header_end..]).to_string(),
        }
    });

    (base, handle)
}

fn sample_command(name: &str) -> SlashCommand {
    let text = ArgumentDescriptor::string(ArgumentOptions::new("text", "Some text."));
    SlashCommand::new(name, "Integration command.").args("<{}>", &[&text])
}

// ---------------------------------------------------------------------------
// Manager and adapters
// ---------------------------------------------------------------------------

#[test]
fn test_adapters_build_registration_payload() {
    let mut manager: CommandManager = CommandManager::new();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);

    sample_command("echo")
        .member_permissions(&[Permission::SendMessages])
        .adapter(&mut manager)
        .execute(move |interaction: &Value| {
            sink.borrow_mut().push(interaction["id"].clone());
        });
    sample_command("about").register_only(&mut manager);

    let registrar = MemoryRegistrar::default();
    let config = RegistrationConfig::new("token", "1095");
    assert_eq!(manager.register_all(&registrar, &config).unwrap(), 2);

    let bodies = registrar.bodies.borrow();
    assert_eq!(bodies[0][0]["name"], "echo");
    assert_eq!(bodies[0][0]["default_member_permissions"], "2048");
    assert_eq!(bodies[0][1]["name"], "about");
    assert_eq!(bodies[0][1]["options"][0]["required"], true);

    assert!(manager.execute("echo", &serde_json::json!({"id": "abc"})));
    assert!(!manager.execute("about", &serde_json::json!({"id": "def"})));
    assert_eq!(*calls.borrow(), vec![Value::from("abc")]);
}

#[test]
fn test_register_all_requires_token_first() {
    let manager: CommandManager = CommandManager::new();
    let registrar = MemoryRegistrar::default();

    let err = manager
        .register_all(&registrar, &RegistrationConfig::default())
        .unwrap_err();
    assert!(matches!(err, RegistryError::MissingToken));
    assert!(registrar.bodies.borrow().is_empty());
}

#[test]
fn test_logged_definition_reloads_into_package() {
    let dir = tempfile::TempDir::new().unwrap();
    let template = dir.path().join("defs/{name}.json");
    let mut manager: CommandManager = CommandManager::new();

    sample_command("logme")
        .adapter(&mut manager)
        .log(template.to_str().unwrap())
        .unwrap()
        .execute(|_| {});

    let text = std::fs::read_to_string(dir.path().join("defs/logme.json")).unwrap();
    let data: SlashCommandData = serde_json::from_str(&text).unwrap();

    let mut package = CommandPackage::new("1.0.0");
    package.commands.push(data);
    assert_eq!(package.commands, manager.definitions());
}

#[test]
fn test_log_definition_without_placeholder() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("fixed.json");
    let data = sample_command("fixed").into_data();

    let written = log_definition(path.to_str().unwrap(), &data).unwrap();
    assert_eq!(written, path);
}

// ---------------------------------------------------------------------------
// HTTP registrar
// ---------------------------------------------------------------------------

#[test]
fn test_http_registrar_puts_guild_commands() {
    let (base, server) = serve_once("200 OK", r#"[{"id":"1","name":"echo"}]"#);
    let registrar = HttpRegistrar::new().with_base_url(base);
    let config = RegistrationConfig::new("secret-token", "1095").with_guild("77");

    let data = sample_command("echo").into_data();
    let count = registrar
        .put_commands(&config, std::slice::from_ref(&data))
        .unwrap();
    assert_eq!(count, 1);

    let request = server.join().unwrap();
    assert!(
        request
            .head
            .starts_with("PUT /applications/1095/guilds/77/commands HTTP/1.1")
    );
    assert!(
        request
            .head
            .to_ascii_lowercase()
            .contains("authorization: bot secret-token")
    );
    let body: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body[0]["name"], "echo");
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[test]
fn test_http_registrar_maps_status_errors() {
    let (base, server) = serve_once("401 Unauthorized", r#"{"message":"401: Unauthorized"}"#);
    let registrar = HttpRegistrar::new().with_base_url(base);
    let config = RegistrationConfig::new("bad-token", "1095");

    let err = registrar.put_commands(&config, &[]).unwrap_err();
    assert!(matches!(err, RegistryError::Status(401)));
    server.join().unwrap();
}
