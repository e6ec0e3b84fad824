use core::fmt::Display;

/// Startup failures the bot cannot run without.
pub(crate) trait MapOrExit<V> {
    /// Unwraps `Ok`, or logs `message` with the error and exits with status 1.
    fn map_or_exit<M: AsRef<str>>(self, message: M) -> V;
}

impl<V, E: Display> MapOrExit<V> for Result<V, E> {
    fn map_or_exit<M: AsRef<str>>(self, message: M) -> V {
        self.unwrap_or_else(|e| {
            log::error!("{}: {}", message.as_ref(), e);
            std::process::exit(1)
        })
    }
}
