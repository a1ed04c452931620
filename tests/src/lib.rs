#[cfg(test)]
mod roast;
#[cfg(test)]
mod utils;
