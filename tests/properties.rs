//! Property-based tests for command rendering.
//!
//! These tests use proptest to generate repository and package requests and
//! verify that ordering, fail-open and formatting invariants hold.

use proptest::prelude::*;
use repokit::{
    DistroContext, RepoAction, RepoCatalog, RepoDescriptor, RepoSource, debian_package_install,
    handle_repos,
};

/// Repository names known to the built-in catalog plus some unknown ones.
fn repo_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("ceph".to_string()),
        Just("epel".to_string()),
        Just("grafana".to_string()),
        Just("kibana".to_string()),
        Just("influxdb".to_string()),
        Just("td-agent".to_string()),
        "missing_[a-z]{1,8}",
    ]
}

fn action_strategy() -> impl Strategy<Value = RepoAction> {
    prop_oneof![Just(RepoAction::Enable), Just(RepoAction::Disable)]
}

fn distro_strategy() -> impl Strategy<Value = DistroContext> {
    prop_oneof![
        Just(DistroContext::rpm("centos", "yum")),
        Just(DistroContext::rpm("centos", "dnf")),
        Just(DistroContext::rpm("rhel", "yum")),
        Just(DistroContext::deb("debian")),
        Just(DistroContext::deb("ubuntu")),
    ]
}

/// A plain package name.
fn named_package_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9+.-]{0,15}"
}

/// A download URL for a .deb file.
fn remote_package_strategy() -> impl Strategy<Value = String> {
    "[a-z]{3,10}".prop_map(|name| format!("https://example.org/pool/{}_1.0_amd64.deb", name))
}

fn package_strategy() -> impl Strategy<Value = String> {
    prop_oneof![named_package_strategy(), remote_package_strategy()]
}

/// The token a resolved repository contributes to the rendered command.
fn token(descriptor: &RepoDescriptor) -> String {
    match &descriptor.source {
        RepoSource::Rpm { id } => format!(" {}", id),
        RepoSource::Apt { .. } => format!("/{}.list", descriptor.list_file()),
    }
}

proptest! {
    #[test]
    fn unknown_repos_render_nothing(
        ctx in distro_strategy(),
        names in prop::collection::vec("missing_[a-z]{1,8}", 0..5),
        action in action_strategy(),
    ) {
        let catalog = RepoCatalog::builtin().unwrap();
        prop_assert_eq!(handle_repos(&catalog, &ctx, &names, action), "");
    }

    #[test]
    fn apt_disable_is_always_empty(
        distro in prop_oneof![Just("debian"), Just("ubuntu")],
        names in prop::collection::vec(repo_name_strategy(), 1..6),
    ) {
        let catalog = RepoCatalog::builtin().unwrap();
        let ctx = DistroContext::deb(distro);
        prop_assert_eq!(handle_repos(&catalog, &ctx, &names, RepoAction::Disable), "");
    }

    #[test]
    fn rendering_is_deterministic(
        ctx in distro_strategy(),
        names in prop::collection::vec(repo_name_strategy(), 0..6),
        action in action_strategy(),
    ) {
        let catalog = RepoCatalog::builtin().unwrap();
        let first = handle_repos(&catalog, &ctx, &names, action);
        let second = handle_repos(&catalog, &ctx, &names, action);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn resolved_repos_keep_request_order(
        ctx in distro_strategy(),
        names in prop::collection::vec(repo_name_strategy(), 1..6),
    ) {
        let catalog = RepoCatalog::builtin().unwrap();
        let command = handle_repos(&catalog, &ctx, &names, RepoAction::Enable);

        let tokens: Vec<String> = names
            .iter()
            .filter_map(|name| catalog.lookup(ctx.base_distro(), name))
            .map(token)
            .collect();

        if tokens.is_empty() {
            prop_assert_eq!(command, "");
        } else {
            prop_assert!(command.starts_with("RUN "));
            let mut cursor = 0;
            for token in &tokens {
                let found = command[cursor..].find(token.as_str());
                prop_assert!(found.is_some(), "{:?} missing after {} in {:?}", token, cursor, command);
                cursor += found.unwrap() + token.len();
            }
        }
    }

    #[test]
    fn package_install_never_dangles_join(
        packages in prop::collection::vec(package_strategy(), 0..6),
    ) {
        let command = debian_package_install(&packages);

        if packages.is_empty() {
            prop_assert_eq!(command, "");
        } else {
            prop_assert!(!command.starts_with(" &&"));
            prop_assert!(!command.ends_with("&& "));
            prop_assert!(!command.contains("&&  &&"));
            prop_assert!(!command.contains("&& &&"));
            let segments = command.split(" && ").count();
            prop_assert!((1..=2).contains(&segments));
        }
    }

    #[test]
    fn named_packages_keep_order(
        packages in prop::collection::vec(named_package_strategy(), 1..6),
    ) {
        let command = debian_package_install(&packages);
        prop_assert_eq!(
            command,
            format!("apt-get -y install --no-install-recommends {}", packages.join(" "))
        );
    }
}
