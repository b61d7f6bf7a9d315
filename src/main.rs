//! Command-line unwrapper for mesh documents and glTF files

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use facefold::io::{self, DocumentFormat};
use facefold::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "facefold")]
#[command(version, about = "Unwrap mesh faces into a flat UV layout", long_about = None)]
struct Cli {
    /// Mesh document (.ron/.json) or glTF file (.gltf/.glb), a cube when omitted
    input: Option<PathBuf>,

    /// Write the result as .ron or .json
    #[arg(long)]
    out: Option<PathBuf>,

    /// Write a PNG of the layout
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Preview size in pixels
    #[arg(long, default_value = "512", value_parser = clap::value_parser!(u32).range(1..))]
    size: u32,

    /// Corner matching distance (default 0.001)
    #[arg(long, value_parser = parse_tolerance)]
    tolerance: Option<f32>,

    /// Lay out every island, not just the first
    #[arg(long, conflicts_with = "strict")]
    reseed: bool,

    /// Fail if any face cannot be placed
    #[arg(long)]
    strict: bool,
}

impl Cli {
    fn island_policy(&self) -> Option<IslandPolicy> {
        if self.reseed {
            Some(IslandPolicy::Reseed)
        } else if self.strict {
            Some(IslandPolicy::Strict)
        } else {
            None
        }
    }
}

fn parse_tolerance(raw: &str) -> Result<f32, String> {
    let tolerance: f32 = raw.parse().map_err(|_| format!("invalid tolerance: {raw}"))?;
    if tolerance.is_nan() || tolerance <= 0.0 {
        return Err(format!("tolerance must be positive: {raw}"));
    }
    Ok(tolerance)
}

fn load_document(cli: &Cli) -> Result<MeshDocument, DocumentError> {
    let Some(path) = &cli.input else {
        log::info!("No input given, unwrapping the built-in cube");
        return Ok(MeshDocument::new("Cube", PolyMesh::cube(1.0)));
    };

    match DocumentFormat::from_path(path)? {
        DocumentFormat::Gltf => {
            let name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(MeshDocument::new(name, load_gltf(path)?))
        }
        DocumentFormat::Ron | DocumentFormat::Json => MeshDocument::load(path),
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut document = load_document(cli)?;

    if let Some(tolerance) = cli.tolerance {
        document.config = document.config.with_edge_tolerance(tolerance);
    }
    if let Some(policy) = cli.island_policy() {
        document.config = document.config.with_island_policy(policy);
    }

    log::info!(
        "Unwrapping '{}': {} faces, {} vertices",
        document.name,
        document.mesh.face_count(),
        document.mesh.vertex_count()
    );

    let result = document.unwrap_mesh()?;
    println!("{}", result.stats.format_stats());

    if let Some(path) = &cli.out {
        io::save_result(&result, path)?;
    }

    if let Some(path) = &cli.preview {
        let style = PreviewStyle::default().with_size(cli.size);
        io::save_preview(&result, &style, path)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("facefold error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "facefold",
            "mesh.glb",
            "--out",
            "uv.json",
            "--preview",
            "uv.png",
            "--size",
            "256",
            "--tolerance",
            "0.01",
            "--reseed",
        ])
        .unwrap();

        assert_eq!(cli.input, Some(PathBuf::from("mesh.glb")));
        assert_eq!(cli.out, Some(PathBuf::from("uv.json")));
        assert_eq!(cli.preview, Some(PathBuf::from("uv.png")));
        assert_eq!(cli.size, 256);
        assert_eq!(cli.tolerance, Some(0.01));
        assert_eq!(cli.island_policy(), Some(IslandPolicy::Reseed));
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["facefold"]).unwrap();

        assert_eq!(cli.input, None);
        assert_eq!(cli.size, 512);
        assert_eq!(cli.tolerance, None);
        assert_eq!(cli.island_policy(), None);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Cli::try_parse_from(["facefold", "--out"]).is_err());
        assert!(Cli::try_parse_from(["facefold", "--tolerance", "-1"]).is_err());
        assert!(Cli::try_parse_from(["facefold", "--tolerance", "0"]).is_err());
        assert!(Cli::try_parse_from(["facefold", "--size", "0"]).is_err());
        assert!(Cli::try_parse_from(["facefold", "--bogus"]).is_err());
        assert!(Cli::try_parse_from(["facefold", "a.ron", "b.ron"]).is_err());
        assert!(Cli::try_parse_from(["facefold", "--reseed", "--strict"]).is_err());
    }

    #[test]
    fn test_default_document_is_cube() {
        let cli = Cli::try_parse_from(["facefold"]).unwrap();
        let document = load_document(&cli).unwrap();
        let result = document.unwrap_mesh().unwrap();

        assert_eq!(result.len(), 6);
        assert!(result.stats.is_complete());
    }
}
