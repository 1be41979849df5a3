// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

mod commit;
mod outline;
mod persona;
mod report;

pub use commit::*;
pub use outline::*;
pub use persona::*;
pub use report::*;
