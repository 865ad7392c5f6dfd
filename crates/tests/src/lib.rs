#[cfg(test)]
mod common;

#[cfg(test)]
mod http_auth_tests;

#[cfg(test)]
mod http_case_tests;

#[cfg(test)]
mod http_error_tests;

#[cfg(test)]
mod session_tests;

#[cfg(test)]
mod demo_backend_tests;
