#[cfg(test)]
mod common;

#[cfg(test)]
mod change_password_flow_tests;

#[cfg(test)]
mod password_client_tests;
