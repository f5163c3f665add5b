// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::io::{Error, ErrorKind};
use std::path::Path;
use std::process::Command;

#[cfg(target_os = "macos")]
fn command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(target_os = "windows")]
fn command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(&["/C", "start", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}

/// Hand `path` to the platform's default image viewer. The viewer runs
/// detached; only a failure to launch it is reported.
pub fn show(path: &Path) -> Result<(), Error> {
    if !path.exists() {
        return Err(Error::new(
            ErrorKind::NotFound,
            format!("'{}' does not exist", path.display()),
        ));
    }
    let child = command(path).spawn()?;
    debug!("viewer started for {} (pid {})", path.display(), child.id());
    Ok(())
}
