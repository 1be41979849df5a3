// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

#![no_main]

use ghostline::CodeSanitizer;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(mut sanitizer) = CodeSanitizer::with_terms(&["Acme", "HDFC", "Project X"]) else {
        return;
    };
    let redacted = sanitizer.debrand(data);
    assert_eq!(
        redacted.secrets_removed,
        redacted.secret_kinds.values().sum::<usize>()
    );
});
