// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification of inbound chat content into text or commands.
//!
//! Two input shapes are accepted: slash-prefixed text (`/tip 0.5 usdc`) and
//! the pre-parsed `{ command, params }` object some chat runtimes deliver.
//! Both end up as the same [`Command`] value.

use serde_json::{Map, Value};
use soulfan_chain::{TipToken, to_base_units};
use soulfan_core::MessageContent;
use strum::{Display, EnumString};

/// Tip amount used when none (or an invalid one) is given.
pub const DEFAULT_TIP_AMOUNT: &str = "0.01";

/// Network a tip is requested on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Network {
    #[default]
    Sepolia,
}

/// A recognized chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/tip [amount] [token] [network]`
    Tip {
        amount: String,
        token: TipToken,
        network: Network,
    },
    /// `/image <prompt...>`
    Image { prompt: String },
    /// Any other trigger.
    Unrecognized { trigger: String },
}

/// What an inbound message asks the persona to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Text(String),
    Command(Command),
}

/// Classifies message content.
pub fn classify(content: &MessageContent) -> Classified {
    match content {
        MessageContent::Plain(text) | MessageContent::Text { content: text } => {
            classify_text(text)
        }
        MessageContent::Command { command, params } => {
            Classified::Command(parse_structured(command, params))
        }
    }
}

fn classify_text(text: &str) -> Classified {
    let trimmed = text.trim();
    if trimmed.starts_with('/') {
        Classified::Command(parse_text_command(trimmed))
    } else {
        Classified::Text(trimmed.to_string())
    }
}

/// Parses a slash command line such as `/tip 0.5 usdc sepolia`.
pub fn parse_text_command(line: &str) -> Command {
    let mut words = line.split_whitespace();
    let trigger = words.next().unwrap_or_default();
    match normalize_trigger(trigger).as_str() {
        "tip" => {
            let args: Vec<&str> = words.collect();
            tip(args.first().copied(), args.get(1).copied(), args.get(2).copied())
        }
        "image" => Command::Image {
            prompt: words.collect::<Vec<_>>().join(" "),
        },
        _ => Command::Unrecognized {
            trigger: trigger.to_string(),
        },
    }
}

fn parse_structured(command: &str, params: &Map<String, Value>) -> Command {
    match normalize_trigger(command).as_str() {
        "tip" => tip(
            param(params, "amount").as_deref(),
            param(params, "token").as_deref(),
            param(params, "network").as_deref(),
        ),
        "image" => {
            let prompt = param(params, "prompt")
                .filter(|p| !p.trim().is_empty())
                .or_else(|| param(params, "imageDescription"))
                .unwrap_or_default();
            Command::Image {
                prompt: prompt.trim().to_string(),
            }
        }
        _ => Command::Unrecognized {
            trigger: command.to_string(),
        },
    }
}

fn normalize_trigger(trigger: &str) -> String {
    trigger.trim().trim_start_matches('/').to_ascii_lowercase()
}

/// Reads a parameter as a string, accepting JSON strings and numbers.
fn param(params: &Map<String, Value>, key: &str) -> Option<String> {
    match params.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn tip(amount: Option<&str>, token: Option<&str>, network: Option<&str>) -> Command {
    let token = token
        .and_then(|t| t.parse::<TipToken>().ok())
        .unwrap_or_default();
    let network = network
        .and_then(|n| n.parse::<Network>().ok())
        .unwrap_or_default();
    let amount = amount
        .map(str::trim)
        .filter(|a| to_base_units(a, token).is_ok())
        .unwrap_or(DEFAULT_TIP_AMOUNT)
        .to_string();
    Command::Tip {
        amount,
        token,
        network,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn structured(command: &str, params: Value) -> MessageContent {
        MessageContent::Command {
            command: command.into(),
            params: params.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn plain_text_is_text() {
        assert_eq!(
            classify(&MessageContent::Plain("  hello there ".into())),
            Classified::Text("hello there".into())
        );
        assert_eq!(
            classify(&MessageContent::Text {
                content: "hi".into()
            }),
            Classified::Text("hi".into())
        );
    }

    #[test]
    fn bare_tip_uses_defaults() {
        assert_eq!(
            parse_text_command("/tip"),
            Command::Tip {
                amount: "0.01".into(),
                token: TipToken::Eth,
                network: Network::Sepolia,
            }
        );
    }

    #[test]
    fn tip_with_all_arguments() {
        assert_eq!(
            parse_text_command("/tip 2.5 USDC sepolia"),
            Command::Tip {
                amount: "2.5".into(),
                token: TipToken::Usdc,
                network: Network::Sepolia,
            }
        );
    }

    #[test]
    fn invalid_tip_values_fall_back() {
        assert_eq!(
            parse_text_command("/tip lots doge mainnet"),
            Command::Tip {
                amount: "0.01".into(),
                token: TipToken::Eth,
                network: Network::Sepolia,
            }
        );
        match parse_text_command("/tip -3") {
            Command::Tip { amount, .. } => assert_eq!(amount, "0.01"),
            other => panic!("expected tip, got {other:?}"),
        }
    }

    #[test]
    fn image_takes_rest_of_line() {
        assert_eq!(
            classify(&MessageContent::Plain("/image a cat in a hat".into())),
            Classified::Command(Command::Image {
                prompt: "a cat in a hat".into()
            })
        );
        assert_eq!(
            parse_text_command("/IMAGE"),
            Command::Image {
                prompt: String::new()
            }
        );
    }

    #[test]
    fn unknown_trigger_is_unrecognized() {
        assert_eq!(
            parse_text_command("/dance now"),
            Command::Unrecognized {
                trigger: "/dance".into()
            }
        );
    }

    #[test]
    fn structured_tip_accepts_numbers() {
        let content = structured("/tip", json!({"amount": 5, "token": "usdc"}));
        assert_eq!(
            classify(&content),
            Classified::Command(Command::Tip {
                amount: "5".into(),
                token: TipToken::Usdc,
                network: Network::Sepolia,
            })
        );
    }

    #[test]
    fn structured_image_falls_back_to_description() {
        let content = structured("image", json!({"imageDescription": "sunset over dunes"}));
        assert_eq!(
            classify(&content),
            Classified::Command(Command::Image {
                prompt: "sunset over dunes".into()
            })
        );
    }

    #[test]
    fn structured_unknown_command() {
        let content = structured("/wave", json!({}));
        assert_eq!(
            classify(&content),
            Classified::Command(Command::Unrecognized {
                trigger: "/wave".into()
            })
        );
    }
}
