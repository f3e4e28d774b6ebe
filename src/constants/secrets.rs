use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Directory docker mounts secrets into.
pub const DOCKER_SECRETS_PATH: &str = "/run/secrets/";

/// Read a secret file from `dir`. Secret names are matched in lowercase and
/// a single trailing newline is dropped.
pub fn read_secret(dir: &Path, name: &str) -> Result<String, std::io::Error> {
    let mut secret_val = String::new();
    File::open(dir.join(name.to_lowercase()))?.read_to_string(&mut secret_val)?;
    if secret_val.ends_with('\n') {
        secret_val.pop();
        if secret_val.ends_with('\r') {
            secret_val.pop();
        }
    }
    Ok(secret_val)
}
