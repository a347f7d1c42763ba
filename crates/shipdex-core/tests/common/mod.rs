pub mod swapi_server;
