use std::time::Duration;

use ureq::Agent;

/// Build a blocking HTTP agent with a global request timeout.
pub fn build_agent(timeout: Duration) -> Agent {
    let config = Agent::config_builder()
        .timeout_global(Some(timeout))
        .build();
    config.into()
}
