use std::error::Error;
use vergen_gitcl::{BuildBuilder, CargoBuilder, Emitter, GitclBuilder};

fn main() -> Result<(), Box<dyn Error>> {
	let mut emitter = Emitter::default();

	emitter
		.add_instructions(&BuildBuilder::default().build_date(true).build()?)?
		.add_instructions(&CargoBuilder::default().target_triple(true).build()?)?;

	// Release tarballs carry no git metadata.
	if emitter.add_instructions(&GitclBuilder::default().sha(true).build()?).is_err() {
		println!("cargo:rustc-env=VERGEN_GIT_SHA=crates.io");
	}

	emitter.emit()?;

	Ok(())
}
