//! Slash command definitions.

use serde::Serialize;

pub const SEARCH_COMMAND: &str = "search";
pub const QUERY_OPTION: &str = "query";

const CHAT_INPUT: u8 = 1;
const STRING_OPTION: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub options: Vec<CommandOptionDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOptionDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub required: bool,
}

pub fn search_command() -> CommandDefinition {
    CommandDefinition {
        name: SEARCH_COMMAND.to_string(),
        description: "Search for a movie or series to request".to_string(),
        kind: CHAT_INPUT,
        options: vec![CommandOptionDefinition {
            name: QUERY_OPTION.to_string(),
            description: "Title to search for".to_string(),
            kind: STRING_OPTION,
            required: true,
        }],
    }
}

/// Every command the bot answers.
pub fn all_commands() -> Vec<CommandDefinition> {
    vec![search_command()]
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn search_takes_one_required_string() {
        assert_eq!(
            serde_json::to_value(search_command()).unwrap(),
            json!({
                "name": "search",
                "description": "Search for a movie or series to request",
                "type": 1,
                "options": [{
                    "name": "query",
                    "description": "Title to search for",
                    "type": 3,
                    "required": true
                }]
            })
        );
    }
}
