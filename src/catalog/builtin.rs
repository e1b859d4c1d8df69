//! Built-in CloudEdge price list.

use super::options::{
    Addon, BootDiskType, CommitmentTerm, GpuType, InstanceTemplate, OperatingSystem,
    ProvisioningModel, Region,
};
use super::resources::{ResourceDefinition, ResourceRole};
use super::CatalogFile;

#[allow(clippy::too_many_arguments)]
fn resource(
    id: &str,
    label: &str,
    unit: &str,
    price_per_unit: f64,
    min: u32,
    max: u32,
    step: u32,
    default_value: u32,
    role: ResourceRole,
    tooltip: &str,
) -> ResourceDefinition {
    ResourceDefinition {
        id: id.into(),
        label: label.into(),
        unit: unit.into(),
        price_per_unit,
        min,
        max,
        step,
        default_value,
        role,
        tooltip: tooltip.into(),
    }
}

fn resources() -> Vec<ResourceDefinition> {
    use ResourceRole::*;
    vec![
        resource("cores", "CPU Cores", "vCPU", 10.00, 1, 128, 1, 2, Compute,
            "Virtual CPU cores for your instance or VDC."),
        resource("ram", "RAM", "GB", 5.00, 1, 512, 1, 4, Memory,
            "Random Access Memory for your instance or VDC."),
        resource("flashDisk", "Flash Disk Storage / Boot Disk Size", "GB", 0.10, 10, 10240, 10, 50, PrimaryStorage,
            "Primary high-speed storage. For Instances, this is the Boot Disk size."),
        resource("ephemeralPublicIPs", "Ephemeral Public IPs", "IP", 2.00, 0, 10, 1, 0, Other,
            "Dynamic IP addresses, released when the instance stops."),
        resource("staticPublicIPs", "Static Public IPs", "IP", 4.00, 0, 64, 1, 0, Other,
            "Fixed IP addresses reserved for your use."),
        resource("objectStorage", "Object Storage", "GB", 0.02, 0, 102400, 100, 0, Other,
            "Scalable storage for unstructured data."),
        resource("advBackup", "Advanced Backup by Veeam", "GB", 0.05, 0, 100000, 50, 0, Other,
            "Backup storage managed by Veeam."),
        resource("trendMicro", "Trend Micro Deep Security", "VM License", 15.00, 0, 100, 1, 0, Other,
            "Security licenses for Trend Micro Deep Security."),
        resource("windowsLicenses", "Windows Server Licenses (Add-on)", "License", 20.00, 0, 100, 1, 0, Other,
            "Additional Windows Server licenses if not covered by OS selection."),
        resource("linuxLicenses", "Linux Enterprise Licenses (Add-on)", "License", 10.00, 0, 100, 1, 0, Other,
            "Additional Enterprise Linux licenses if not covered by OS selection."),
        resource("cortexXDR", "Cortex XDR Endpoint Protection", "Endpoint", 8.00, 0, 100, 1, 0, Other,
            "Palo Alto Networks Cortex XDR licenses."),
        resource("loadBalancerIP", "Load Balancer Instance", "Instance", 18.00, 0, 10, 1, 0, Other,
            "Managed Load Balancer instances."),
    ]
}

fn regions() -> Vec<Region> {
    [
        ("wp-us-east-1", "WP US East (N. Virginia)", 1.0),
        ("wp-us-west-1", "WP US West (Oregon)", 1.05),
        ("wp-eu-central-1", "WP EU (Frankfurt)", 1.1),
        ("wp-apac-tokyo-1", "WP APAC (Tokyo)", 1.15),
    ]
    .into_iter()
    .map(|(id, name, price_multiplier)| Region {
        id: id.into(),
        name: name.into(),
        price_multiplier,
    })
    .collect()
}

fn boot_disk_types() -> Vec<BootDiskType> {
    [
        ("balanced-ssd", "Balanced SSD", 1.0),
        ("performance-ssd", "Performance SSD", 1.5),
        ("standard-hdd", "Standard HDD", 0.5),
    ]
    .into_iter()
    .map(|(id, name, price_per_gb_multiplier)| BootDiskType {
        id: id.into(),
        name: name.into(),
        price_per_gb_multiplier,
    })
    .collect()
}

fn provisioning_models() -> Vec<ProvisioningModel> {
    vec![
        ProvisioningModel {
            id: "regular".into(),
            name: "Regular (On-demand)".into(),
            price_multiplier: 1.0,
        },
        ProvisioningModel {
            id: "spot".into(),
            name: "Spot/Preemptible (Up to 70% Disc.)".into(),
            price_multiplier: 0.3,
        },
    ]
}

fn operating_systems() -> Vec<OperatingSystem> {
    [
        ("wp-linux-std", "WP Linux Standard (Free)", 0.0, "linux", None),
        ("wp-ubuntu-pro", "WP Ubuntu Pro", 5.0, "linux", Some("linuxLicenses")),
        ("wp-win-std", "WP Windows Server Standard", 15.0, "windows", Some("windowsLicenses")),
        ("wp-win-dc", "WP Windows Server Datacenter", 30.0, "windows", Some("windowsLicenses")),
        ("byol", "Bring Your Own License (BYOL)", 0.0, "byol", None),
    ]
    .into_iter()
    .map(|(id, name, price_monthly, base, license)| OperatingSystem {
        id: id.into(),
        name: name.into(),
        price_monthly,
        base_os_type: base.into(),
        requires_license_resource: license.map(str::to_string),
    })
    .collect()
}

fn gpu_types() -> Vec<GpuType> {
    vec![
        GpuType {
            id: "wp-gpu-t4".into(),
            name: "WP GPU T4-Class (General Purpose)".into(),
            price_monthly: 150.0,
            max_count: 8,
            compatible_series: vec!["wp-n-series".into(), "wp-c-series".into()],
        },
        GpuType {
            id: "wp-gpu-a100".into(),
            name: "WP GPU A100-Class (Compute Optimized)".into(),
            price_monthly: 400.0,
            max_count: 7,
            compatible_series: vec!["wp-a-series".into()],
        },
    ]
}

fn instance_templates() -> Vec<InstanceTemplate> {
    [
        ("wp-gen-s1", "WP General Small (S1)", (2, 4, 50), "balanced-ssd", "wp-n-series"),
        ("wp-gen-m1", "WP General Medium (M1)", (4, 16, 100), "balanced-ssd", "wp-n-series"),
        ("wp-gen-l1", "WP General Large (L1)", (8, 32, 200), "balanced-ssd", "wp-n-series"),
        ("wp-comp-c1", "WP Compute Optimized (C1)", (4, 8, 80), "performance-ssd", "wp-c-series"),
        ("wp-mem-m1", "WP Memory Optimized (M1)", (2, 32, 100), "balanced-ssd", "wp-m-series"),
    ]
    .into_iter()
    .map(|(id, name, (cores, ram, flash_disk), disk, series)| InstanceTemplate {
        id: id.into(),
        name: name.into(),
        cores,
        ram,
        flash_disk,
        default_os_id: "wp-linux-std".into(),
        default_boot_disk_type_id: disk.into(),
        series: series.into(),
    })
    .collect()
}

fn commitment_terms() -> Vec<CommitmentTerm> {
    [
        ("monthly", "Monthly", 1.0, 0.0, "/mo"),
        ("3months", "3 Months", 3.0, 0.0, "/3mo"),
        ("6months", "6 Months", 6.0, 0.0, "/6mo"),
        ("yearly", "1 Year (10% Disc.)", 12.0 * 0.9, 0.10, "/yr"),
        ("3years", "3 Years (20% Disc.)", 36.0 * 0.8, 0.20, "/3yr"),
    ]
    .into_iter()
    .map(|(id, name, price_multiplier, discount, suffix)| CommitmentTerm {
        id: id.into(),
        name: name.into(),
        price_multiplier,
        discount,
        suffix: suffix.into(),
    })
    .collect()
}

fn addons() -> Vec<Addon> {
    vec![
        Addon {
            id: "adv-firewall".into(),
            name: "Advanced Firewall Service".into(),
            price_monthly: 25.0,
            selected: false,
        },
        Addon {
            id: "enhanced-monitoring".into(),
            name: "Enhanced Monitoring Suite".into(),
            price_monthly: 10.0,
            selected: false,
        },
    ]
}

pub(super) fn catalog_file() -> CatalogFile {
    CatalogFile {
        resources: resources(),
        regions: regions(),
        boot_disk_types: boot_disk_types(),
        provisioning_models: provisioning_models(),
        operating_systems: operating_systems(),
        gpu_types: gpu_types(),
        instance_templates: instance_templates(),
        commitment_terms: commitment_terms(),
        addons: addons(),
    }
}
