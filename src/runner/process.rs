//! Host process control
//!
//! Stopping and starting the launcher. Deploying goes through the
//! [`HostProcess`] trait so the order of steps can be checked without a real
//! launcher installed.

#[cfg(windows)]
use crate::runner::pure::powershell_quote;
#[cfg(not(windows))]
use crate::runner::pure::sh_quote;
use crate::runner::types::HostClose;

use std::error::Error;
use std::path::Path;
use std::process::Command;

pub trait HostProcess {
    /// Force the host to exit. A host that isn't running is not an error.
    fn terminate(&mut self, exe: &Path) -> Result<HostClose, Box<dyn Error>>;

    /// Start the host with its own directory as working directory.
    fn launch(&mut self, exe: &Path, run_as_admin: bool) -> Result<(), Box<dyn Error>>;
}

/// Real process control: `taskkill`/PowerShell on Windows, `pkill`/`pkexec` elsewhere.
#[derive(Debug, Default)]
pub struct SystemHostProcess;

fn image_name(exe: &Path) -> Result<String, Box<dyn Error>> {
    exe.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| format!("Invalid executable path: {}", exe.display()).into())
}

fn working_dir(exe: &Path) -> &Path {
    exe.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

impl HostProcess for SystemHostProcess {
    #[cfg(windows)]
    fn terminate(&mut self, exe: &Path) -> Result<HostClose, Box<dyn Error>> {
        let name = image_name(exe)?;
        let output = Command::new("taskkill")
            .args(["/IM", &name, "/F"])
            .output()
            .map_err(|e| format!("Failed to run taskkill: {}", e))?;

        match output.status.code() {
            Some(0) => Ok(HostClose::Closed),
            // taskkill: no such process
            Some(128) => Ok(HostClose::NotRunning),
            code => Err(format!(
                "Error closing {} (exit {}): {}",
                name,
                code.unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            )
            .into()),
        }
    }

    #[cfg(not(windows))]
    fn terminate(&mut self, exe: &Path) -> Result<HostClose, Box<dyn Error>> {
        let name = image_name(exe)?;
        let output = Command::new("pkill")
            .arg("-x")
            .arg(&name)
            .output()
            .map_err(|e| format!("Failed to run pkill: {}", e))?;

        match output.status.code() {
            Some(0) => Ok(HostClose::Closed),
            // pkill: no process matched
            Some(1) => Ok(HostClose::NotRunning),
            code => Err(format!(
                "Error closing {} (exit {}): {}",
                name,
                code.unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim()
            )
            .into()),
        }
    }

    #[cfg(windows)]
    fn launch(&mut self, exe: &Path, run_as_admin: bool) -> Result<(), Box<dyn Error>> {
        let dir = working_dir(exe);

        if run_as_admin {
            let script = format!(
                "Start-Process {} -WorkingDirectory {} -Verb RunAs",
                powershell_quote(&exe.to_string_lossy()),
                powershell_quote(&dir.to_string_lossy())
            );
            println!("[handlerkit] Running: powershell -Command {}", script);
            let status = Command::new("powershell")
                .args(["-NoProfile", "-Command", &script])
                .status()
                .map_err(|e| format!("Failed to run powershell: {}", e))?;
            if !status.success() {
                return Err(format!("Elevated launch failed (exit {})", status.code().unwrap_or(-1)).into());
            }
        } else {
            Command::new(exe)
                .current_dir(dir)
                .spawn()
                .map_err(|e| format!("Failed to launch {}: {}", exe.display(), e))?;
        }
        Ok(())
    }

    #[cfg(not(windows))]
    fn launch(&mut self, exe: &Path, run_as_admin: bool) -> Result<(), Box<dyn Error>> {
        let dir = working_dir(exe);

        if run_as_admin {
            let script = format!(
                "cd {} && exec {}",
                sh_quote(&dir.to_string_lossy()),
                sh_quote(&exe.to_string_lossy())
            );
            println!("[handlerkit] Running: pkexec sh -c '{}'", script);
            Command::new("pkexec")
                .args(["sh", "-c", &script])
                .spawn()
                .map_err(|e| format!("Failed to run pkexec: {}", e))?;
        } else {
            Command::new(exe)
                .current_dir(dir)
                .spawn()
                .map_err(|e| format!("Failed to launch {}: {}", exe.display(), e))?;
        }
        Ok(())
    }
}
