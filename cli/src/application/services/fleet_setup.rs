//! Application service: build a fleet from configuration.

use anyhow::{Context, Result};
use fleetprobe_common::FleetConfig;

use crate::application::ports::{BackendConnector, BackendParams, EndpointProbe, ProgressReporter};
use crate::application::services::fleet_manager::FleetManager;

/// Register every configured target and bind its workloads.
///
/// Targets are registered in name order, each followed by its workloads in
/// declaration order. The first failure aborts setup.
///
/// # Errors
///
/// Returns an error naming the target or workload that could not be
/// registered or bound.
pub async fn build_fleet<C, P>(
    config: &FleetConfig,
    connector: C,
    probe: P,
    reporter: &impl ProgressReporter,
) -> Result<FleetManager<C, P>>
where
    C: BackendConnector,
    P: EndpointProbe,
{
    let mut fleet = FleetManager::new(connector, probe);

    for (target, target_cfg) in &config.targets {
        reporter.step(&format!(
            "Connecting {target} to {}...",
            target_cfg.docker_daemon_url
        ));
        let params = BackendParams::new(&target_cfg.docker_daemon_url);
        fleet
            .register_backend(target, &params)
            .await
            .with_context(|| format!("registering backend for target '{target}'"))?;

        let mut bound = 0;
        for workload in &target_cfg.workloads {
            bound += fleet
                .bind_workload_endpoints(
                    target,
                    &workload.container_name,
                    &workload.network_services,
                )
                .with_context(|| {
                    format!(
                        "binding workload '{}' on target '{target}'",
                        workload.container_name
                    )
                })?;
        }
        reporter.success(&format!("{target}: {bound} endpoint(s) tracked"));
    }

    Ok(fleet)
}
