use std::{
    env::{var as env_var, var_os as env_var_os},
    io::{self, Write},
};

fn main() {
    if is_unix() {
        let target = TargetTriplet::fetch();
        collect_pipe_features(&target);
    }
}

fn is_unix() -> bool {
    env_var_os("CARGO_CFG_UNIX").is_some()
}

/// This can define the following:
/// - `anonpipe_pipe2`, on targets whose libc declares `pipe2(2)` (atomic close-on-exec and
///   non-blocking setup at creation; everywhere else, `pipe(2)` followed by `fcntl(2)` is used)
#[rustfmt::skip]
fn collect_pipe_features(target: &TargetTriplet) {
    if target.os_any(&["linux", "android", "emscripten", "fuchsia", "redox"])
    || target.os_any(&["freebsd", "dragonfly", "openbsd", "netbsd"])
    || target.os_any(&["solaris", "illumos"]) {
        // "Linux-like" in libc terminology plus Fuchsia and Redox, the BSD family except
        // Apple's corner of it, and the Solaris lineage
        define("anonpipe_pipe2");
    }
}

fn define(cfg: &str) {
    ldefine(&[cfg]);
}
fn ldefine(cfgs: &[&str]) {
    let stdout_ = io::stdout();
    let mut stdout = stdout_.lock();
    for i in cfgs {
        stdout.write_all(b"cargo:rustc-cfg=").unwrap();
        stdout.write_all(i.as_ref()).unwrap();
        stdout.write_all(b"\n").unwrap();
    }
}

struct TargetTriplet {
    os: String,
}
#[rustfmt::skip]
impl TargetTriplet {
    fn fetch() -> Self {
        Self { os: env_var("CARGO_CFG_TARGET_OS").unwrap() }
    }
    fn os_any(&self, oses: &[&str]) -> bool { oses.iter().copied().any(|x| x == self.os) }
}
