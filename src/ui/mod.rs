// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the dataset viewer.

pub mod canvas;
pub mod json_tree;
pub mod labs;
pub mod properties;
pub mod scene;
pub mod toolbar;
