use std::error::Error;

// Emits the VERGEN_* variables read by src/config/build_info.rs
fn main() -> Result<(), Box<dyn Error>> {
    vergen_gitcl::Emitter::default()
        .add_instructions(
            &vergen_gitcl::CargoBuilder::default()
                .target_triple(true)
                .build()?,
        )?
        .add_instructions(&vergen_gitcl::GitclBuilder::default().sha(true).build()?)?
        .add_instructions(&vergen_gitcl::RustcBuilder::default().semver(true).build()?)?
        .emit()?;
    Ok(())
}
