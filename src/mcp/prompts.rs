//! Prompt Registry
//!
//! Static walkthroughs that show a host how to chain the tools into a
//! working bot. Prompts take no arguments.

use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptMessage {
    pub role: &'static str,
    pub content: Value,
}

#[derive(Debug)]
pub struct PromptDefinition {
    pub name: &'static str,
    pub description: &'static str,
    body: &'static str,
}

impl PromptDefinition {
    /// The fixed message sequence for this prompt
    pub fn messages(&self) -> Vec<PromptMessage> {
        vec![PromptMessage {
            role: "user",
            content: json!({"type": "text", "text": self.body}),
        }]
    }

    /// The entry as listed by `prompts/list`
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "arguments": [],
        })
    }
}

pub static PROMPTS: &[PromptDefinition] = &[
    PromptDefinition {
        name: "create_echo_bot",
        description: "Build a bot that echoes every text message back to the sender",
        body: include_str!("prompts/create_echo_bot.md"),
    },
    PromptDefinition {
        name: "create_wallet_checker_bot",
        description: "Build a bot that reports the balance and activity of a Solana address",
        body: include_str!("prompts/create_wallet_checker_bot.md"),
    },
    PromptDefinition {
        name: "create_interactive_menu_bot",
        description: "Build a bot with button menus, a carousel and a mini app entry",
        body: include_str!("prompts/create_interactive_menu_bot.md"),
    },
];

pub fn get_prompt(name: &str) -> Option<&'static PromptDefinition> {
    PROMPTS.iter().find(|p| p.name == name)
}
