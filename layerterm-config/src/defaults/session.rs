//! Default values for session and behaviour settings.

pub fn commandline() -> String {
    if cfg!(windows) {
        "cmd.exe".to_string()
    } else {
        "/bin/sh".to_string()
    }
}

pub fn history_size() -> i32 {
    9001
}
