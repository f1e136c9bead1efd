// SPDX-License-Identifier: MPL-2.0
//! Localized UI strings backed by Fluent.
//!
//! Translation files live in `assets/i18n/` and are embedded at build time.

pub mod fluent;
