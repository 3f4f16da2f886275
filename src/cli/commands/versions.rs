use ad_manager::api::VersionRegistry;
use colored::*;

pub fn versions_command(registry: &VersionRegistry) {
    let latest = registry.latest();

    for version in registry.versions() {
        let marker = if Some(version) == latest { " (latest)" } else { "" };
        println!("{}{}", version.bold(), marker.dimmed());

        if let Some(schema) = registry.schema(version) {
            for service in schema.service_names() {
                println!("  {}", service);
            }
        }
    }
}
