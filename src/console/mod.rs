mod console_session;

pub(crate) use console_session::ConsoleSession;
