macro_rules! trace_err {
    () => {};
    ($($arg:tt)*) => {
        if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            eprint!("\x1b[1;31m[seqpipe] ");
            eprint!($($arg)*);
            eprintln!("\x1b[0m");
        } else {
            eprint!("[seqpipe] ");
            eprintln!($($arg)*);
        }
    };
}

macro_rules! trace_info {
    () => {};
    ($($arg:tt)*) => {
        if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
            eprint!("\x1b[1;34m[seqpipe] ");
            eprint!($($arg)*);
            eprintln!("\x1b[0m");
        } else {
            eprint!("[seqpipe] ");
            eprintln!($($arg)*);
        }
    };
}

pub(crate) use trace_err;
pub(crate) use trace_info;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_in_crate() {
        trace_info!("evaluate stages: {}", "filter -> map");
        trace_err!("evaluate failed: {}", 42);
    }
}
