// One module per resource group, mounted by the router in main.rs.
pub mod armazones;
pub mod cliente;
pub mod estado_sucursal;
pub mod materiales;
pub mod pacientes;
pub mod servicios;
pub mod sucursales;
pub mod tipo_cliente;
pub mod tipo_sucursal;
pub mod users;
pub mod users_roles;
