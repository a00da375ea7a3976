pub mod genesis;
pub mod params;

use crate::network::{NetworkType, NetworkTypeError};
use arc_swap::ArcSwapOption;
use log::info;
use params::{Deployment, Params};
use std::str::FromStr;
use std::sync::Arc;

/// The process-wide active chain params. Written once at startup by
/// [`select_params`] and thereafter read-only, except for the narrow
/// deployment-window override used by test harnesses.
static ACTIVE_PARAMS: ArcSwapOption<Params> = ArcSwapOption::const_empty();

/// Builds a fresh profile for a recognized network name. An unrecognized name is
/// a configuration error; the caller should not proceed to networking or
/// validation until a valid network has been selected.
pub fn create_chain_params(network: &str) -> Result<Params, NetworkTypeError> {
    let net = NetworkType::from_str(network)?;
    Ok(Params::from(net))
}

/// Resolves `network` and stores the resulting profile as the process-wide
/// active params. Must be called before any reader calls [`active_params`].
pub fn select_params(network: &str) -> Result<Arc<Params>, NetworkTypeError> {
    let params = Arc::new(create_chain_params(network)?);
    ACTIVE_PARAMS.store(Some(params.clone()));
    info!("selected chain params for network {}", params.net);
    Ok(params)
}

/// Returns the active params. Calling this before [`select_params`] is a caller
/// ordering bug and fails fatally.
pub fn active_params() -> Arc<Params> {
    ACTIVE_PARAMS.load_full().expect("active_params called before select_params")
}

/// Rewrites the activation window of a single deployment on the active params,
/// leaving every other field (including the signaling bit) untouched.
///
/// This is the only post-construction mutation of the otherwise immutable
/// profile and exists solely so test harnesses can simulate different soft-fork
/// activation calendars. It is not safe to call concurrently with readers; the
/// caller must serialize it against them.
pub fn update_deployment_window(deployment: Deployment, start_time: i64, timeout: i64) {
    ACTIVE_PARAMS.rcu(|current| {
        let current = current.as_ref().expect("update_deployment_window called before select_params");
        let mut params = (**current).clone();
        let window = &mut params.consensus.deployments[deployment as usize];
        window.start_time = start_time;
        window.timeout = timeout;
        Some(Arc::new(params))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::NetworkTypeError;
    use params::DeploymentWindow;
    use std::sync::Mutex;
    use ufo_hashes::ZERO_HASH;

    // Tests below share the process-wide registry and must not interleave.
    static REGISTRY_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_create_chain_params() {
        for name in ["main", "test", "regtest"] {
            let params = create_chain_params(name).unwrap();
            assert_eq!(params.network_name(), name);
        }
        assert_eq!(create_chain_params("signet"), Err(NetworkTypeError::InvalidNetworkType("signet".to_string())));
    }

    #[test]
    fn test_select_and_read_active_params() {
        let _guard = REGISTRY_LOCK.lock().unwrap();

        let selected = select_params("regtest").unwrap();
        let active = active_params();
        assert_eq!(*selected, *active);

        // End-to-end regtest expectations: fixed difficulty, full isolation and a
        // well-formed genesis.
        assert!(active.consensus.pow_no_retargeting);
        assert!(active.dns_seeds.is_empty());
        assert!(active.fixed_seeds.is_empty());
        assert_eq!(active.genesis.header.hash_prev_block, ZERO_HASH);
        let coinbase = &active.genesis.transactions[0];
        assert!(coinbase.is_coinbase());
        assert_eq!(coinbase.outputs[0].value, 0);
        assert_eq!(coinbase.outputs[0].script_public_key, vec![0x00, 0xac]);
    }

    #[test]
    fn test_update_deployment_window_touches_only_its_target() {
        let _guard = REGISTRY_LOCK.lock().unwrap();

        select_params("main").unwrap();
        let before = active_params();
        let original_bit = before.deployment(Deployment::Csv).bit;

        update_deployment_window(Deployment::Csv, 0, DeploymentWindow::NO_TIMEOUT);
        let after = active_params();

        let window = after.deployment(Deployment::Csv);
        assert_eq!(window.start_time, 0);
        assert_eq!(window.timeout, DeploymentWindow::NO_TIMEOUT);
        assert_eq!(window.bit, original_bit);

        // Everything except the targeted window is structurally unchanged.
        let mut restored = (*after).clone();
        restored.consensus.deployments[Deployment::Csv as usize] = *before.deployment(Deployment::Csv);
        assert_eq!(restored, *before);
    }
}
