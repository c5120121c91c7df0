#[cfg(test)]
mod driver_tests;
