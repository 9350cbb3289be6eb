// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod encode;
mod inspect;

pub use encode::EncodeCmd;
pub use inspect::InspectCmd;
