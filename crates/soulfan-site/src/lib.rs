// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persona site rendering and publishing for the Soulfan service.
//!
//! [`SiteSynthesizer`] renders a persona page plus its publish script into a
//! [`SiteBundle`](soulfan_core::SiteBundle); [`SiteBuilderPublisher`] runs the
//! bundle through the walrus site builder and returns the published URL.

pub mod publisher;
pub mod synthesizer;
mod template;

pub use publisher::{SiteBuilderPublisher, extract_site_url};
pub use synthesizer::{SiteSynthesizer, escape_html};
