pub mod api_response;
pub mod route_table;
pub mod validated_wrapper;
pub mod validator_utils;
