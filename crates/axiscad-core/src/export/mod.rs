//! Mesh export for assemblies

mod obj;
mod stl;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::assembly::Assembly;
use crate::{Error, Result};

pub use obj::write_obj;
pub use stl::write_stl;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Binary STL
    #[default]
    Stl,
    /// Wavefront OBJ
    Obj,
}

impl ExportFormat {
    /// Parse a format name (case-insensitive, leading dot allowed)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "stl" => Some(Self::Stl),
            "obj" => Some(Self::Obj),
            _ => None,
        }
    }

    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Obj => "obj",
        }
    }

    /// Get a human-readable name for this format
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stl => "STL (Binary)",
            Self::Obj => "OBJ",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| {
            Error::Export(format!("Unknown format '{s}'. Valid options: stl, obj"))
        })
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Write every solid of the assembly, merged into one mesh
pub fn export_assembly<W: Write>(
    assembly: &Assembly,
    format: ExportFormat,
    writer: &mut W,
) -> Result<()> {
    if assembly.is_empty() {
        return Err(Error::Export("assembly is empty".to_string()));
    }
    let mesh = assembly.to_mesh();
    match format {
        ExportFormat::Stl => write_stl(&mesh, writer),
        ExportFormat::Obj => write_obj(&mesh, writer),
    }
}
