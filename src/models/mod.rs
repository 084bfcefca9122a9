pub mod armazon;
pub mod cliente;
pub mod estado_sucursal;
pub mod material;
pub mod paciente;
pub mod servicio;
pub mod sucursal;
pub mod tipo_cliente;
pub mod tipo_sucursal;
pub mod user;
pub mod user_role;
