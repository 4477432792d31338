//! Wallsheet Core Geometry and Annotation
//!
//! This crate holds everything needed to describe a cantilever retaining wall
//! drawing, independent of any output format:
//!
//! - **Wall**: the 9-point wall profile and its 3D projection ([`wall`])
//! - **Contours**: reinforcement contours inset by the concrete cover ([`contour`])
//! - **Steel**: bar rows and mesh grids ([`steel`]), keyed against the
//!   request's bar schedule ([`schedule`])
//! - **Annotation**: dimensions, leaders and title blocks ([`annotation`])
//! - **Draw**: layered drawing primitives handed to backends ([`draw`])
//! - **Colors** and **Geometry** helpers ([`color`], [`geometry`])

pub mod annotation;
pub mod color;
pub mod contour;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod schedule;
pub mod steel;
pub mod wall;
