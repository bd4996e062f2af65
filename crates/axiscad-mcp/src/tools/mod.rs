//! MCP tool request types for axiscad
//!
//! - Modeling (create_box_Axi_W_H, create_cylinder_Axi_R)
//! - Visualization (visualize_models)
//! - Export (export_models)
//!
//! Tool names and argument names match the ones existing clients already send.

pub mod export;
pub mod modeling;
pub mod visualize;
