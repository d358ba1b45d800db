//! Deployment plans.
//!
//! Each operation is first turned into a [`Plan`]: an ordered list of banners
//! and remote commands. Building a plan is pure, so every ordering rule can be
//! checked without a network. Executing it is the application layer's job.

use crate::domain::command::RemoteCommand;
use crate::domain::config::PathsConfig;
use crate::domain::git_ref::GitRef;
use crate::domain::mode::{DeployMode, ModeSet, ModeToken, NginxMode};
use crate::domain::target::{Target, web_root_for_branch};

/// Helm waits this many seconds for a release to become ready.
pub const HELM_TIMEOUT_SECS: u32 = 360;
pub const PROMETHEUS_CHART_VERSION: &str = "9.7.4";
pub const GRAFANA_CHART_VERSION: &str = "4.3.0";

/// One entry of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Section announcement; never sent to the remote host.
    Banner(String),
    /// Remote command.
    Run(RemoteCommand),
}

/// Ordered steps for one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<Step>,
    /// Tokens that were requested but do not apply to the target.
    pub skipped: Vec<&'static str>,
}

impl Plan {
    fn banner(&mut self, text: &str) {
        self.steps.push(Step::Banner(text.to_string()));
    }

    fn run(&mut self, cmd: RemoteCommand) {
        self.steps.push(Step::Run(cmd));
    }

    /// Remote commands only, in order.
    pub fn commands(&self) -> impl Iterator<Item = &RemoteCommand> {
        self.steps.iter().filter_map(|s| match s {
            Step::Run(cmd) => Some(cmd),
            Step::Banner(_) => None,
        })
    }

    /// Rendered shell lines, in order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.commands().map(RemoteCommand::shell_line).collect()
    }
}

// ── Requests ─────────────────────────────────────────────────────────────────

/// Inputs for the load-balancer update.
#[derive(Debug, Clone)]
pub struct NginxRequest {
    /// Load-balancer branch; picks the `/var/www` directory.
    pub branch: String,
    /// Ref to check out in the load-balancer repository.
    pub git_ref: GitRef,
    pub modes: ModeSet<NginxMode>,
}

/// Inputs for a cluster deployment.
#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub target: Target,
    pub git_ref: GitRef,
    pub modes: ModeSet<DeployMode>,
}

fn join(dir: &str, child: &str) -> String {
    format!("{}/{child}", dir.trim_end_matches('/'))
}

fn fetch_and_checkout(plan: &mut Plan, dir: &str, git_ref: &GitRef) {
    plan.run(RemoteCommand::new("git").args(["fetch", "--all"]).in_dir(dir));
    plan.run(
        RemoteCommand::new("git")
            .arg("checkout")
            .arg(git_ref.as_str())
            .in_dir(dir),
    );
}

// ── nginx ────────────────────────────────────────────────────────────────────

/// Plan for updating the load balancer.
///
/// The checkout always runs. `static` replaces the served static files before
/// `config` touches anything under `/etc/nginx`.
#[must_use]
pub fn nginx_plan(req: &NginxRequest, paths: &PathsConfig) -> Plan {
    let repo = paths.nginx_repo.as_str();
    let mut plan = Plan::default();

    plan.banner("Updating code base");
    fetch_and_checkout(&mut plan, repo, &req.git_ref);

    if req.modes.contains(NginxMode::Static) {
        let web = web_root_for_branch(&req.branch);
        plan.banner("Replacing static files");
        plan.run(
            RemoteCommand::new("rm")
                .arg("-rf")
                .path(format!("/var/www/{web}/static"))
                .privileged(),
        );
        plan.run(
            RemoteCommand::new("cp")
                .arg("-R")
                .path(join(repo, "static"))
                .path(format!("/var/www/{web}/"))
                .privileged(),
        );
    }

    if req.modes.contains(NginxMode::Config) {
        plan.banner("Copying config files");
        for dir in ["snippets", "sites-available"] {
            plan.run(
                RemoteCommand::new("cp")
                    .arg("-R")
                    .dir_entries(join(repo, dir))
                    .path(format!("/etc/nginx/{dir}/"))
                    .privileged(),
            );
        }
        plan.banner("Testing config files");
        plan.run(RemoteCommand::new("nginx").arg("-t").privileged());
        plan.banner("Reloading nginx");
        plan.run(
            RemoteCommand::new("systemctl")
                .args(["reload", "nginx.service"])
                .privileged(),
        );
        plan.run(
            RemoteCommand::new("systemctl")
                .args(["status", "nginx.service"])
                .privileged(),
        );
    }

    plan
}

// ── cluster deploy ───────────────────────────────────────────────────────────

/// Plan for deploying services into the cluster.
///
/// Every command runs inside the project root for the target. Production-only
/// tokens are recorded in [`Plan::skipped`] on staging and produce nothing.
#[must_use]
pub fn deploy_plan(req: &DeployRequest, paths: &PathsConfig) -> Plan {
    let root = req.target.project_root(paths).to_string();
    let mut plan = Plan::default();
    let t = req.target;
    let m = &req.modes;

    if t.is_staging() {
        plan.skipped = m
            .iter()
            .filter(|token| token.production_only())
            .map(ModeToken::name)
            .collect();
    }

    if m.contains(DeployMode::FetchCheckout) {
        plan.banner(&format!("Checking out {}", req.git_ref));
        fetch_and_checkout(&mut plan, &root, &req.git_ref);
    }

    let gallery_conf = m.any(&[DeployMode::GalleryConf, DeployMode::GalleryTestConf]);
    if gallery_conf || m.any(&[DeployMode::GalleryApp, DeployMode::GalleryTestApp]) {
        plan.banner("Deploying gallery");
        let ns = format!("--namespace=gallery{}-ns", t.dash_suffix());
        if gallery_conf {
            let secret = RemoteCommand::new("kubectl")
                .args(["create", "secret", "generic", "gallery-config"])
                .arg(format!(
                    "--from-file=gallery/_secret_config{}.py",
                    t.underscore_suffix()
                ))
                .arg(ns.as_str())
                .args(["-o", "yaml", "--dry-run"])
                .pipe(RemoteCommand::new("kubectl").args(["replace", "-f", "-"]));
            plan.run(secret.in_dir(root.as_str()));
            plan.run(
                RemoteCommand::new("kubectl")
                    .args(["delete", "deployment"])
                    .arg(format!("gallery{}", t.dash_suffix()))
                    .arg(ns.as_str())
                    .in_dir(root.as_str()),
            );
        }
        plan.run(
            RemoteCommand::new("kubectl")
                .args(["apply", "-f"])
                .arg(format!("gallery/config{}.yaml", t.underscore_suffix()))
                .arg(ns.as_str())
                .in_dir(root.as_str()),
        );
    }

    if !t.is_staging() && m.contains(DeployMode::GalleryArchives) {
        plan.banner("Scheduling gallery archives");
        plan.run(
            RemoteCommand::new("kubectl")
                .args(["apply", "-f", "gallery/cron_job.yaml", "-n", "gallery-ns"])
                .in_dir(root.as_str()),
        );
    }

    if m.any(&[DeployMode::JhubNs, DeployMode::JhubTestNs]) {
        plan.banner("Deploying JupyterHub");
        helm_release(&mut plan, &root, "gesishub", "jhub", t);
    }

    if m.any(&[DeployMode::BhubNs, DeployMode::BhubTestNs]) {
        plan.banner("Deploying BinderHub");
        helm_release(&mut plan, &root, "gesisbinder", "bhub", t);
    }

    if !t.is_staging() && m.contains(DeployMode::BhubUpgrade) {
        plan.banner("Scheduling BinderHub upgrade bot");
        for manifest in ["gesisbinder/bot/_secret_cron_job.yaml", "gesisbinder/bot/cron_job.yaml"] {
            plan.run(
                RemoteCommand::new("kubectl")
                    .args(["apply", "-f", manifest, "-n", "bhub-ns"])
                    .in_dir(root.as_str()),
            );
        }
    }

    if !t.is_staging() && m.contains(DeployMode::Prometheus) {
        plan.banner("Upgrading Prometheus");
        plan.run(
            monitoring_upgrade("prometheus", PROMETHEUS_CHART_VERSION, &[
                "monitoring/prometheus_config.yaml",
            ])
            .in_dir(root.as_str()),
        );
    }

    if !t.is_staging() && m.contains(DeployMode::Grafana) {
        plan.banner("Upgrading Grafana");
        plan.run(
            monitoring_upgrade("grafana", GRAFANA_CHART_VERSION, &[
                "monitoring/grafana_config.yaml",
                "monitoring/_secret_grafana.yaml",
            ])
            .in_dir(root.as_str()),
        );
    }

    plan
}

fn wait_flags() -> [String; 4] {
    [
        "--wait".to_string(),
        "--force".to_string(),
        "--debug".to_string(),
        format!("--timeout={HELM_TIMEOUT_SECS}"),
    ]
}

/// `helm upgrade --install` of a chart kept in the project checkout.
fn helm_release(plan: &mut Plan, root: &str, chart_dir: &str, release: &str, t: Target) {
    let chart = format!("{chart_dir}/{chart_dir}");
    plan.run(RemoteCommand::new("helm").args(["repo", "update"]).in_dir(root));
    plan.run(
        RemoteCommand::new("helm")
            .args(["dependency", "update"])
            .arg(chart.as_str())
            .in_dir(root),
    );
    plan.run(
        RemoteCommand::new("helm")
            .args(["upgrade", "--install"])
            .arg(format!("--namespace={release}{}-ns", t.dash_suffix()))
            .arg(format!("{release}{}", t.dash_suffix()))
            .arg(chart.as_str())
            .args(wait_flags())
            .arg("-f")
            .arg(format!("{chart_dir}/config{}.yaml", t.underscore_suffix()))
            .arg("-f")
            .arg(format!("{chart_dir}/_secret{}.yaml", t.underscore_suffix()))
            .in_dir(root),
    );
}

/// `helm upgrade` of a pinned upstream monitoring chart.
fn monitoring_upgrade(name: &str, version: &str, values: &[&str]) -> RemoteCommand {
    let mut cmd = RemoteCommand::new("helm")
        .arg("upgrade")
        .arg(name)
        .arg(format!("stable/{name}"))
        .arg(format!("--version={version}"));
    for file in values {
        cmd = cmd.args(["-f", *file]);
    }
    cmd.args(wait_flags())
}

// ── smoke test ───────────────────────────────────────────────────────────────

/// Connectivity check: print the project root and list it.
#[must_use]
pub fn smoke_test_plan(target: Target, paths: &PathsConfig) -> Plan {
    let root = target.project_root(paths);
    let mut plan = Plan::default();
    plan.run(RemoteCommand::new("pwd").in_dir(root));
    plan.run(RemoteCommand::new("ls").arg("-alh").in_dir(root));
    plan
}
