// $ cargo run --package dns-resolver --example server

use dns_resolver::resolve::{AuthorityCleaner, CacheResolver, ChainResolver, IterativeResolver, StaticResolver};
use dns_resolver::server::serve_udp;
use permit::Permit;
use std::collections::HashMap;
use std::io::Read;

fn main() {
    env_logger::init();
    let permit = Permit::new();
    let serve_udp_permit = permit.new_sub();

    let pipeline = AuthorityCleaner::new(CacheResolver::new(ChainResolver::new(vec![
        Box::new(StaticResolver::new(HashMap::new())),
        Box::new(IterativeResolver::default()),
    ])));

    let join_handle = std::thread::spawn(move || {
        serve_udp(&serve_udp_permit, "127.0.0.1:5300", &pipeline).unwrap();
    });
    println!("Serving on 127.0.0.1:5300, press enter to stop");
    while std::io::stdin().read(&mut [0u8]).is_ok() {}
    permit.revoke();
    join_handle.join().unwrap();
}
