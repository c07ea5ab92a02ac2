use deskicons_core::log_error;

/// Prints an error, logs it and exits with status 1.
pub fn fail(message: &str) -> ! {
    log_error!("{message}");
    eprintln!("Error: {message}");
    std::process::exit(1);
}

/// Reports that desktop commands need a Windows shell.
#[cfg(not(windows))]
pub fn unsupported() -> ! {
    fail("unsupported platform: desktop icons can only be managed on Windows");
}

/// Opens the desktop, runs `action` and closes the controller.
///
/// The controller is closed exactly once whether or not `action`
/// succeeds. Any error, including one from closing, exits the process.
#[cfg(windows)]
pub fn run<T>(
    config: &deskicons_core::Config,
    action: impl FnOnce(&mut deskicons_windows::IconManager) -> deskicons_core::IconResult<T>,
) -> T {
    let mut manager = match deskicons_windows::open_icon_manager(config.listview.text_capacity)
    {
        Ok(manager) => manager,
        Err(e) => fail(&format!("could not open the desktop list view: {e}")),
    };

    let result = action(&mut manager);
    let closed = manager.close();

    match (result, closed) {
        (Ok(value), Ok(())) => value,
        (Err(e), _) => fail(&format!("{e} [{}]", e.error_code())),
        (Ok(_), Err(e)) => fail(&format!("could not release shell resources: {e}")),
    }
}
