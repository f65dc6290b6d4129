mod helpers;
mod test_analyze;
mod test_fmt;
mod test_init;
