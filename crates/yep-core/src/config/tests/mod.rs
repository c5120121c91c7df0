#[cfg(test)]
mod settings_tests;
