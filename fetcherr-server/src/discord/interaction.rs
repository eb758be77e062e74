//! Inbound interaction payloads.

use chrono::{DateTime, Utc};
use fetcherr_model::Requester;
use serde::Deserialize;
use serde_json::Value;

/// Milliseconds between the Unix epoch and the first second of 2015.
const DISCORD_EPOCH_MS: i64 = 1_420_070_400_000;
const CDN_BASE: &str = "https://cdn.discordapp.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Ping,
    ApplicationCommand,
    MessageComponent,
    Autocomplete,
    ModalSubmit,
}

impl InteractionKind {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Ping),
            2 => Some(Self::ApplicationCommand),
            3 => Some(Self::MessageComponent),
            4 => Some(Self::Autocomplete),
            5 => Some(Self::ModalSubmit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub token: String,
    pub channel_id: Option<String>,
    pub guild_id: Option<String>,
    pub member: Option<Member>,
    pub user: Option<User>,
    pub data: Option<InteractionData>,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub user: Option<User>,
    pub nick: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub username: String,
    pub global_name: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractionData {
    pub name: Option<String>,
    #[serde(default)]
    pub options: Vec<CommandOption>,
    pub custom_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandOption {
    pub name: String,
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub id: String,
    pub timestamp: Option<String>,
}

impl Interaction {
    pub fn kind(&self) -> Option<InteractionKind> {
        InteractionKind::from_code(self.kind)
    }

    pub fn command_name(&self) -> Option<&str> {
        self.data.as_ref()?.name.as_deref()
    }

    /// String value of a command option, if it was supplied as a string.
    pub fn string_option(&self, name: &str) -> Option<&str> {
        self.data
            .as_ref()?
            .options
            .iter()
            .find(|option| option.name == name)?
            .value
            .as_ref()?
            .as_str()
    }

    pub fn custom_id(&self) -> Option<&str> {
        self.data.as_ref()?.custom_id.as_deref()
    }

    pub fn channel_snowflake(&self) -> Option<u64> {
        self.channel_id.as_deref()?.parse().ok()
    }

    /// Guild invocations carry the user inside `member`; DMs carry it
    /// at the top level.
    pub fn user(&self) -> Option<&User> {
        self.member
            .as_ref()
            .and_then(|member| member.user.as_ref())
            .or(self.user.as_ref())
    }

    pub fn requester(&self) -> Requester {
        let Some(user) = self.user() else {
            return Requester::default();
        };

        let nick = self
            .member
            .as_ref()
            .and_then(|member| member.nick.as_deref())
            .filter(|nick| !nick.is_empty());
        let display_name = nick
            .or(user.global_name.as_deref().filter(|name| !name.is_empty()))
            .unwrap_or(&user.username);

        Requester::new(display_name, Some(user.avatar_url()))
    }

    /// When the message carrying the activated component was posted.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        let message = self.message.as_ref()?;
        message
            .timestamp
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|at| at.with_timezone(&Utc))
            .or_else(|| snowflake_time(&message.id))
    }
}

impl User {
    pub fn avatar_url(&self) -> String {
        match &self.avatar {
            Some(hash) => {
                format!("{CDN_BASE}/avatars/{}/{hash}.png", self.id)
            }
            None => {
                let index =
                    self.id.parse::<u64>().map(|id| (id >> 22) % 6).unwrap_or(0);
                format!("{CDN_BASE}/embed/avatars/{index}.png")
            }
        }
    }
}

/// Creation time encoded in the top bits of a snowflake id.
pub fn snowflake_time(id: &str) -> Option<DateTime<Utc>> {
    let id: u64 = id.parse().ok()?;
    let millis = i64::try_from(id >> 22).ok()? + DISCORD_EPOCH_MS;
    DateTime::from_timestamp_millis(millis)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: Value) -> Interaction {
        serde_json::from_value(value).expect("interaction")
    }

    #[test]
    fn guild_command_exposes_query_and_member() {
        let interaction = parse(json!({
            "type": 2,
            "id": "1",
            "token": "tok",
            "channel_id": "555",
            "member": {
                "nick": "Chani",
                "user": {"id": "80351110224678912", "username": "chani", "avatar": "abc"}
            },
            "data": {
                "name": "search",
                "options": [{"name": "query", "type": 3, "value": "Dune"}]
            }
        }));

        assert_eq!(interaction.kind(), Some(InteractionKind::ApplicationCommand));
        assert_eq!(interaction.command_name(), Some("search"));
        assert_eq!(interaction.string_option("query"), Some("Dune"));
        assert_eq!(interaction.channel_snowflake(), Some(555));

        let requester = interaction.requester();
        assert_eq!(requester.display_name, "Chani");
        assert_eq!(
            requester.avatar_url.as_deref(),
            Some("https://cdn.discordapp.com/avatars/80351110224678912/abc.png")
        );
    }

    #[test]
    fn display_name_falls_back_through_global_and_username() {
        let dm = parse(json!({
            "type": 2,
            "user": {"id": "1", "username": "paul", "global_name": "Paul Atreides"}
        }));
        assert_eq!(dm.requester().display_name, "Paul Atreides");

        let plain = parse(json!({
            "type": 2,
            "member": {"user": {"id": "1", "username": "stilgar"}}
        }));
        assert_eq!(plain.requester().display_name, "stilgar");
    }

    #[test]
    fn default_avatar_is_derived_from_the_id() {
        let user = User {
            id: "80351110224678912".into(),
            username: "u".into(),
            global_name: None,
            avatar: None,
        };
        let index = (80351110224678912u64 >> 22) % 6;
        assert_eq!(
            user.avatar_url(),
            format!("https://cdn.discordapp.com/embed/avatars/{index}.png")
        );
    }

    #[test]
    fn issued_at_prefers_timestamp_then_snowflake() {
        let with_timestamp = parse(json!({
            "type": 3,
            "message": {"id": "0", "timestamp": "2024-01-01T12:00:00.000000+00:00"}
        }));
        assert_eq!(
            with_timestamp.issued_at().map(|at| at.timestamp()),
            Some(1_704_110_400)
        );

        // 1_000 ms after the epoch, shifted into the timestamp bits
        let id = (1_000u64 << 22).to_string();
        let from_id = parse(json!({"type": 3, "message": {"id": id}}));
        assert_eq!(
            from_id.issued_at().map(|at| at.timestamp_millis()),
            Some(DISCORD_EPOCH_MS + 1_000)
        );

        let without_message = parse(json!({"type": 3}));
        assert_eq!(without_message.issued_at(), None);
    }
}
