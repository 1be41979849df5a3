// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

#![no_main]

use ghostline::CodeSanitizer;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(mut sanitizer) = CodeSanitizer::with_terms::<&str>(&[]) else {
        return;
    };
    // Whatever parses must still parse once every body is stubbed.
    if let Ok(shadow) = sanitizer.generate_shadow_structure(data) {
        assert!(sanitizer.generate_shadow_structure(&shadow.text).is_ok());
    }
    let _ = sanitizer.diagram_or_marker(data);
});
