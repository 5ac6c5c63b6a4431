// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data models for annotations and the canvas viewport.

pub mod annotation;
pub mod viewport;
