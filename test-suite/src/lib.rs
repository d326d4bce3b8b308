#[cfg(test)]
mod common_setup;
