use std::fs;
use std::path::Path;

/// A complete `/proc/<pid>/stat` line with utime=100, stime=50 and a start
/// time of 500 ticks
pub const STAT_LINE: &str = "4242 (sleep) S 1 4242 4242 0 -1 4194304 100 0 0 0 100 50 0 0 20 0 1 0 500 \
8425472 234 18446744073709551615 94000000000000 94000000020000 140730000000000 0 0 0 0 0 0 0 0 0 \
17 3 0 0 0 0 0 94000000030000 94000000031000 94000001000000 140730000001000 140730000001020 \
140730000001020 140730000002000 0\n";

pub const STATUS: &str = "Name:\tsleep\n\
State:\tS (sleeping)\n\
Pid:\t4242\n\
VmPeak:\t    8228 kB\n\
VmSize:\t    8228 kB\n\
VmRSS:\t     936 kB\n\
Threads:\t1\n";

pub const IO: &str = "rchar: 1948\n\
wchar: 0\n\
syscr: 7\n\
syscw: 0\n\
read_bytes: 4096\n\
write_bytes: 0\n\
cancelled_write_bytes: 0\n";

/// Lay out `<root>/<pid>/{status,stat,io,fd/*}` and `<root>/uptime`
pub fn fake_process(root: &Path, pid: u32, fds: usize, uptime: &str) {
    let dir = root.join(pid.to_string());
    fs::create_dir_all(dir.join("fd")).unwrap();
    fs::write(dir.join("status"), STATUS).unwrap();
    fs::write(dir.join("stat"), STAT_LINE).unwrap();
    fs::write(dir.join("io"), IO).unwrap();
    for fd in 0..fds {
        fs::write(dir.join("fd").join(fd.to_string()), b"").unwrap();
    }
    fs::write(root.join("uptime"), uptime).unwrap();
}
