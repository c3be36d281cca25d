//! Pagedraw Core Types and Definitions
//!
//! This crate provides the foundational types shared by the pagedraw
//! parsers and renderers. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: SVG drawing primitives for diagram elements ([`draw`] module)
//! - **Semantic**: Diagram models produced by the parsers ([`semantic`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod semantic;
