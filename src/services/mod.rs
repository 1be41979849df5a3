// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

pub mod analyzer;
pub mod clock;
pub mod debrand;
pub mod diagram;
pub mod git;
pub mod safety;
pub mod sanitizer;
pub mod scheduler;
pub mod shadow;
