// Crate entry point. Re-export modules so tests and binaries can import them easily.
//
// Responsibilities
// - Only declare and expose modules. No business logic here.
//
// How it is used
// - The API crate wires `application::store::EventStore` to a concrete
//   gateway from `adapters`. Tests import from the crate root.

pub mod core {
    pub mod event;
    pub mod patch;
    pub mod ports;
    pub mod rollup;
    pub mod status;
}

pub mod application {
    pub mod errors;
    pub mod store;
}

pub mod adapters {
    pub mod in_memory {
        pub mod in_memory_gateway;
    }
    pub mod json_file {
        pub mod json_file_gateway;
    }
}

pub mod test_support {
    pub mod fixtures {
        pub mod events;
    }
}
