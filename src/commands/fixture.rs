//! `climock fixture` commands.

use std::path::Path;

use crate::fixture::normalize::relax_body;
use crate::fixture::{Fixture, FixtureReplayer};

/// Execute `fixture scopes`: list every scope and its calls.
///
/// # Errors
///
/// Returns an error string if the fixture cannot be loaded.
pub fn scopes(path: &Path) -> Result<(), String> {
    let fixture = Fixture::load(path).map_err(|e| e.to_string())?;
    println!("Fixture: {}", fixture.name);
    println!("Recorded: {}", fixture.recorded_at.to_rfc3339());

    for (index, scope) in fixture.scopes.iter().enumerate() {
        println!("\n#{index} ({} call(s))", scope.len());
        for call in scope {
            println!("  {} {}{} -> {}", call.method, call.scope, call.path, call.status);
        }
    }

    println!("\n{} scope(s) total.", fixture.scopes.len());
    Ok(())
}

/// Execute `fixture show`: print one scope as YAML.
///
/// # Errors
///
/// Returns an error string if the fixture cannot be loaded or has no scope
/// at `index`.
pub fn show(path: &Path, index: usize) -> Result<(), String> {
    let replayer = FixtureReplayer::load(path).map_err(|e| e.to_string())?;
    let scope = replayer.scope(index).map_err(|e| e.to_string())?;
    let yaml = serde_yaml::to_string(scope)
        .map_err(|e| format!("Failed to render scope #{index}: {e}"))?;
    print!("{yaml}");
    Ok(())
}

/// Execute `fixture normalize`: relax body matching of mutating calls.
///
/// # Errors
///
/// Returns an error string if the fixture cannot be loaded or written.
pub fn normalize(path: &Path, dry_run: bool) -> Result<(), String> {
    let mut fixture = Fixture::load(path).map_err(|e| e.to_string())?;
    let changed = normalize_fixture(&mut fixture);

    if dry_run {
        println!("Dry run: would relax {changed} call(s) in {}", path.display());
        return Ok(());
    }
    if changed > 0 {
        fixture.save(path).map_err(|e| e.to_string())?;
    }
    println!("Relaxed {changed} call(s) in {}", path.display());
    Ok(())
}

/// Applies [`relax_body`] to every call, returning how many changed.
fn normalize_fixture(fixture: &mut Fixture) -> usize {
    fixture.scopes.iter_mut().flatten().map(relax_body).filter(|changed| *changed).count()
}
