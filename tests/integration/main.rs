mod cli_test;
mod network_test;
mod search_test;
mod store_test;
mod subsumption_test;
