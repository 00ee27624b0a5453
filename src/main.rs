//! nodeheap - demo binary
//!
//! Walks through the containers on a small bounded heap and shows what
//! happens when it runs out.

use nodeheap::{HeapConfig, List, OrderedMap, RingBuffer};

fn main() {
    println!("===========================================");
    println!("  nodeheap - bounded node containers");
    println!("===========================================");
    println!();

    println!("List with capacity 4...");
    let mut list = List::with_capacity(4);
    for v in [1, 2, 3, 4, 5] {
        match list.push_back(v) {
            Ok(()) => println!("  pushed {}", v),
            Err(e) => println!("  refused {}: {}", e.value(), e),
        }
    }
    println!("  contents: {:?}", list);
    println!("  pop_front: {:?}", list.pop_front());
    println!("  at(7): {:?}", list.at(7));
    println!();

    println!("OrderedMap with capacity 3...");
    let mut map = OrderedMap::with_config(HeapConfig::with_capacity(3));
    for (k, v) in [(30, "thirty"), (10, "ten"), (20, "twenty"), (40, "forty")] {
        match map.emplace(k, v) {
            Ok((_, inserted)) => println!("  emplace {} -> inserted: {}", k, inserted),
            Err(e) => println!("  refused {:?}: {}", e.value(), e),
        }
    }
    println!("  contents: {:?}", map);
    println!("  first: {:?}", map.first_key_value());
    println!();

    println!("RingBuffer<u8, 2>...");
    let mut ring: RingBuffer<u8, 2> = RingBuffer::new();
    for b in [b'a', b'b', b'c'] {
        println!("  push {:?}: {:?}", b as char, ring.push(b).is_ok());
    }
    println!("  pop: {:?}", ring.pop().map(char::from));
}
