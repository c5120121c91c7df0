#[cfg(test)]
mod launcher_tests;
