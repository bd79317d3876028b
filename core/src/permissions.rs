//! Member permission flags and bitmask computation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownKind;

macro_rules! permissions {
    ($($variant:ident = $bit:expr),+ $(,)?) => {
        /// A guild member permission, identified by its bit position.
        ///
        /// # Examples
        ///
        /// ```
        /// use slash_command_core::Permission;
        ///
        /// assert_eq!(Permission::KickMembers.bits(), 2);
        /// assert_eq!("BanMembers".parse::<Permission>().unwrap(), Permission::BanMembers);
        /// assert_eq!(
        ///     Permission::combine(&[Permission::KickMembers, Permission::BanMembers]),
        ///     6
        /// );
        /// ```
        #[allow(clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Permission {
            $($variant),+
        }

        impl Permission {
            /// All known permissions.
            pub const ALL: &'static [Permission] = &[$(Permission::$variant),+];

            /// Returns the single-bit mask for this permission.
            pub fn bits(self) -> u64 {
                match self {
                    $(Permission::$variant => 1u64 << $bit),+
                }
            }

            /// Returns the symbolic name.
            pub fn name(self) -> &'static str {
                match self {
                    $(Permission::$variant => stringify!($variant)),+
                }
            }
        }
    };
}

permissions! {
    CreateInstantInvite = 0,
    KickMembers = 1,
    BanMembers = 2,
    Administrator = 3,
    ManageChannels = 4,
    ManageGuild = 5,
    AddReactions = 6,
    ViewAuditLog = 7,
    PrioritySpeaker = 8,
    Stream = 9,
    ViewChannel = 10,
    SendMessages = 11,
    SendTTSMessages = 12,
    ManageMessages = 13,
    EmbedLinks = 14,
    AttachFiles = 15,
    ReadMessageHistory = 16,
    MentionEveryone = 17,
    UseExternalEmojis = 18,
    ViewGuildInsights = 19,
    Connect = 20,
    Speak = 21,
    MuteMembers = 22,
    DeafenMembers = 23,
    MoveMembers = 24,
    UseVAD = 25,
    ChangeNickname = 26,
    ManageNicknames = 27,
    ManageRoles = 28,
    ManageWebhooks = 29,
    ManageGuildExpressions = 30,
    UseApplicationCommands = 31,
    RequestToSpeak = 32,
    ManageEvents = 33,
    ManageThreads = 34,
    CreatePublicThreads = 35,
    CreatePrivateThreads = 36,
    UseExternalStickers = 37,
    SendMessagesInThreads = 38,
    UseEmbeddedActivities = 39,
    ModerateMembers = 40,
    ViewCreatorMonetizationAnalytics = 41,
    UseSoundboard = 42,
    CreateGuildExpressions = 43,
    CreateEvents = 44,
    UseExternalSounds = 45,
    SendVoiceMessages = 46,
}

impl Permission {
    /// ORs the bits of every permission together. An empty slice yields `0`.
    pub fn combine(permissions: &[Permission]) -> u64 {
        permissions.iter().fold(0, |mask, p| mask | p.bits())
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Permission {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| UnknownKind {
                table: "permission",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_match_positions() {
        assert_eq!(Permission::CreateInstantInvite.bits(), 1);
        assert_eq!(Permission::Administrator.bits(), 8);
        assert_eq!(Permission::ModerateMembers.bits(), 1 << 40);
    }

    #[test]
    fn test_combine_is_bitwise_or() {
        let mask = Permission::combine(&[
            Permission::ManageMessages,
            Permission::ManageMessages,
            Permission::SendMessages,
        ]);
        assert_eq!(mask, (1 << 13) | (1 << 11));
        assert_eq!(Permission::combine(&[]), 0);
    }

    #[test]
    fn test_parse_rejects_unknown_name() {
        assert!("ManageEverything".parse::<Permission>().is_err());
        assert_eq!(
            "UseVAD".parse::<Permission>().unwrap().to_string(),
            "UseVAD"
        );
    }
}
