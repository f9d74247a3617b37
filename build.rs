use anyhow::Result;
use vergen::EmitBuilder;

// Emits VERGEN_GIT_SHA for `gyroscope2gpx --version`. Outside a git checkout
// vergen falls back to a placeholder value instead of failing the build.
fn main() -> Result<()> {
    EmitBuilder::builder().git_sha(true).emit()?;
    Ok(())
}
