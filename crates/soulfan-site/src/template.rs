// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static markup for the persona page.
//!
//! Placeholders are `{{name}}` style and are only ever substituted with
//! HTML-escaped values. The inline script reads dynamic values from the
//! `data-*` attributes on `#persona`, never from interpolated literals.

pub(crate) const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{name}} | SoulFan</title>
  <style>
    :root { color-scheme: dark; }
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      min-height: 100vh;
      display: flex;
      align-items: center;
      justify-content: center;
      font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
      background: linear-gradient(135deg, #1a0b2e 0%, #3d1a5b 50%, #ff4f8b 100%);
      color: #fff;
    }
    .card {
      width: min(420px, 92vw);
      padding: 2rem;
      border-radius: 24px;
      background: rgba(255, 255, 255, 0.08);
      backdrop-filter: blur(12px);
      box-shadow: 0 20px 60px rgba(0, 0, 0, 0.35);
      text-align: center;
    }
    .avatar {
      width: 220px;
      height: 220px;
      border-radius: 50%;
      object-fit: cover;
      border: 4px solid rgba(255, 255, 255, 0.6);
    }
    h1 { margin-top: 1.25rem; font-size: 2rem; }
    .token { opacity: 0.7; margin-top: 0.25rem; }
    .wallet {
      margin-top: 1.5rem;
      display: flex;
      gap: 0.5rem;
      align-items: center;
      justify-content: center;
      font-family: ui-monospace, monospace;
      font-size: 0.85rem;
    }
    button {
      border: none;
      border-radius: 999px;
      padding: 0.4rem 0.9rem;
      background: #ff4f8b;
      color: #fff;
      cursor: pointer;
    }
    button:hover { background: #ff6fa1; }
  </style>
</head>
<body>
  <main class="card" id="persona" data-wallet="{{wallet}}" data-token-id="{{token_id}}" data-blob-id="{{blob_id}}">
    <img class="avatar" src="{{avatar_url}}" alt="{{name}}">
    <h1>{{name}}</h1>
    <p class="token">Persona #{{token_id}}</p>
    <div class="wallet">
      <span id="wallet-label">{{short_wallet}}</span>
      <button type="button" id="copy-wallet">Copy wallet</button>
    </div>
  </main>
  <script>
    (function () {
      var persona = document.getElementById("persona");
      var button = document.getElementById("copy-wallet");
      button.addEventListener("click", function () {
        var wallet = persona.dataset.wallet;
        navigator.clipboard.writeText(wallet).then(function () {
          button.textContent = "Copied!";
          setTimeout(function () { button.textContent = "Copy wallet"; }, 1500);
        });
      });
    })();
  </script>
</body>
</html>
"#;
