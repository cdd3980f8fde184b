#[cfg(test)]
mod common;

#[cfg(test)]
mod school_api_tests;

#[cfg(test)]
mod cookie_middleware_tests;
