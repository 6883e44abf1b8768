// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Renders the persona page and the script that publishes it.

use soulfan_config::model::{SiteConfig, WalrusConfig};
use soulfan_core::{BlobId, SiteBundle, TokenId, WalletAddress};

use crate::template::INDEX_HTML;

/// Directory, relative to the scratch root, holding the site files.
pub const SITE_DIR: &str = "site";
/// Page file inside [`SITE_DIR`].
pub const INDEX_FILE: &str = "index.html";
/// Publish script at the scratch root.
pub const PUBLISH_SCRIPT: &str = "publish.sh";
/// Prefix the publish script puts before the published URL.
pub const URL_MARKER: &str = "WALRUS_URL:";

/// Produces [`SiteBundle`]s for persona pages.
#[derive(Debug, Clone)]
pub struct SiteSynthesizer {
    aggregator_url: String,
    builder_bin: String,
    builder_config: Option<String>,
    epochs: u32,
}

impl SiteSynthesizer {
    pub fn new(site: &SiteConfig, walrus: &WalrusConfig) -> Self {
        Self {
            aggregator_url: walrus.aggregator_url.trim_end_matches('/').to_string(),
            builder_bin: site.builder_bin.clone(),
            builder_config: site.builder_config.clone(),
            epochs: site.epochs,
        }
    }

    /// Renders the page for one persona along with its publish script.
    pub fn render(
        &self,
        blob_id: &BlobId,
        wallet: &WalletAddress,
        token_id: TokenId,
        name: &str,
    ) -> SiteBundle {
        let avatar_url = format!("{}/v1/blobs/{}", self.aggregator_url, blob_id);
        let token = token_id.to_string();
        let index_html = fill(
            INDEX_HTML,
            &[
                ("name", name),
                ("wallet", wallet.as_str()),
                ("short_wallet", &short_address(wallet.as_str())),
                ("token_id", &token),
                ("blob_id", &blob_id.0),
                ("avatar_url", &avatar_url),
            ],
        );

        SiteBundle {
            blob_id: blob_id.clone(),
            index_html,
            publish_script: self.publish_script(),
        }
    }

    /// Shell script that runs the site builder and echoes the published URL
    /// behind [`URL_MARKER`].
    pub fn publish_script(&self) -> String {
        let epochs = self.epochs.to_string();
        let mut args: Vec<&str> = vec![self.builder_bin.as_str()];
        if let Some(config) = &self.builder_config {
            args.extend(["--config", config.as_str()]);
        }
        args.extend(["publish", "--epochs", epochs.as_str(), SITE_DIR]);
        let command = shell_words::join(args);

        format!(
            r#"#!/bin/sh
set -eu
cd "$(dirname "$0")"

set +e
output=$({command} 2>&1)
status=$?
set -e

if [ "$status" -ne 0 ]; then
  printf '%s\n' "$output" >&2
  exit "$status"
fi

printf '%s\n' "$output"
url=$(printf '%s\n' "$output" | grep -Eo 'https://[A-Za-z0-9.-]+\.walrus\.site' | head -n 1 || true)
if [ -n "$url" ]; then
  echo "{URL_MARKER}$url"
fi
"#
        )
    }
}

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Single-pass placeholder substitution. Values are escaped and never rescanned.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match values.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(&escape_html(value)),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn short_address(address: &str) -> String {
    if address.len() <= 12 {
        return address.to_string();
    }
    format!("{}…{}", &address[..6], &address[address.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthesizer() -> SiteSynthesizer {
        SiteSynthesizer::new(&SiteConfig::default(), &WalrusConfig::default())
    }

    fn wallet() -> WalletAddress {
        WalletAddress::parse("0x14dC79964da2C08b23698B3D3cc7Ca32193d9955").unwrap()
    }

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn render_embeds_persona_fields() {
        let bundle = synthesizer().render(&BlobId("blob-7".into()), &wallet(), TokenId(7), "Whiskers");
        let html = &bundle.index_html;
        assert!(html.contains("<h1>Whiskers</h1>"));
        assert!(html.contains(r#"data-wallet="0x14dC79964da2C08b23698B3D3cc7Ca32193d9955""#));
        assert!(html.contains("Persona #7"));
        assert!(html.contains("https://walrus-testnet-aggregator.nodes.guru/v1/blobs/blob-7"));
        assert!(!html.contains("{{"));
        assert_eq!(bundle.blob_id, BlobId("blob-7".into()));
    }

    #[test]
    fn render_escapes_hostile_name() {
        let name = r#"</h1><script>alert("x")</script>"#;
        let bundle = synthesizer().render(&BlobId("b".into()), &wallet(), TokenId(1), name);
        assert!(!bundle.index_html.contains("<script>alert"));
        assert!(bundle.index_html.contains("&lt;/h1&gt;&lt;script&gt;"));
    }

    #[test]
    fn placeholder_text_in_values_is_not_expanded() {
        let out = fill("{{a}}-{{b}}", &[("a", "{{b}}"), ("b", "x")]);
        assert_eq!(out, "{{b}}-x");
    }

    #[test]
    fn publish_script_quotes_arguments() {
        let site = SiteConfig {
            builder_bin: "/opt/walrus tools/site-builder".into(),
            builder_config: Some("/etc/walrus/sites-config.yaml".into()),
            epochs: 5,
        };
        let script = SiteSynthesizer::new(&site, &WalrusConfig::default()).publish_script();
        assert!(script.contains(
            "'/opt/walrus tools/site-builder' --config /etc/walrus/sites-config.yaml publish --epochs 5 site"
        ));
        assert!(script.contains("echo \"WALRUS_URL:$url\""));
    }

    #[test]
    fn short_address_keeps_ends() {
        assert_eq!(
            short_address("0x14dC79964da2C08b23698B3D3cc7Ca32193d9955"),
            "0x14dC…9955"
        );
    }
}
