// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Game logic: prompt oracle, submission pipeline, and round controller.

pub mod controller;
pub mod oracle;
pub mod pipeline;
