pub mod car_store;
