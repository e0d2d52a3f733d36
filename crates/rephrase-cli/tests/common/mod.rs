use assert_cmd::Command;

/// Variables that feed `BrowserArgs` defaults
pub const BROWSER_ENV: [&str; 7] = [
    "CHROME_PATH",
    "CHROME_USER_DATA_DIR",
    "CHROME_PROFILE_DIR",
    "HEADLESS",
    "COPY_PROFILE",
    "QUILLBOT_URL",
    "ALLOW_EMPTY_RESULT",
];

/// The `rephrase` binary with the browser environment cleared
#[allow(deprecated)]
pub fn rephrase() -> Command {
    let mut cmd = Command::cargo_bin("rephrase").unwrap();
    for var in BROWSER_ENV {
        cmd.env_remove(var);
    }
    cmd
}
