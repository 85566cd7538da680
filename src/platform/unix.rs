use std::ffi::CStr;

#[cfg(target_os = "linux")]
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

pub fn kernel_release() -> Option<String> {
    unsafe {
        let mut uts: libc::utsname = std::mem::zeroed();
        if libc::uname(&mut uts) != 0 {
            return None;
        }
        let release = CStr::from_ptr(uts.release.as_ptr())
            .to_string_lossy()
            .trim()
            .to_string();
        if release.is_empty() {
            return None;
        }
        Some(release)
    }
}

#[cfg(target_os = "linux")]
pub fn read_os_release(path: &std::path::Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => super::parse_os_release(&String::from_utf8_lossy(&bytes)),
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "os-release not readable");
            None
        }
    }
}
